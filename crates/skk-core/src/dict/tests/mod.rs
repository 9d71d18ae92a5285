mod system_dict;
